pub mod application {
    pub mod prescription {
        pub mod assemble_cart;
        pub mod process;
        pub mod resolve_catalog;
    }
}

pub mod domain {
    pub mod logger;
    pub mod prescription {
        pub mod errors;
        pub mod model;
        pub mod normalizer;
        pub mod services;
        pub mod value_objects;
        pub mod use_cases {
            pub mod process;
        }
    }
}
