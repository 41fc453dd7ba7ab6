pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod handlers {
    pub mod health;
    pub mod peers;
}

pub mod models {
    pub mod column;
    pub mod node_stats;
}

pub mod stores {
    pub mod node_list;
}

pub mod table {
    pub mod auto_refresh;
    pub mod cache;
    pub mod model;
    pub mod provider;
    pub mod sorting;
}
