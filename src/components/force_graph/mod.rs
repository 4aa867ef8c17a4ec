mod binder;
mod component;
mod events;
mod filter;
mod forces;
mod interaction;
mod load;
mod render;
mod simulation;
mod state;
mod store;
mod types;

pub use component::CompanyGraph;
pub use load::load_graph_data;
