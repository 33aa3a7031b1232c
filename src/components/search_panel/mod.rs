mod component;
mod ports;

pub use component::SearchPanel;
