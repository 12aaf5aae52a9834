pub mod client;

pub mod jammer_client {
    pub mod model;
}
