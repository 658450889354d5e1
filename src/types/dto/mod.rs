// Request and response models shared by the API and the client
pub mod common;
pub mod items;
