pub mod shared {
    pub mod core {
        pub mod primitives;
    }
}

pub mod modules {
    pub mod time_entries {
        pub mod core {
            pub mod find_options;
            pub mod time_entry;
        }
        pub mod use_cases {
            pub mod list_time_entries_by_user {
                pub mod attributes_port;
                pub mod handler;
                pub mod identity_port;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
                pub mod queries_port;
                pub mod query_options;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod in_memory_store;
            }
        }
    }
}

pub mod shell;
