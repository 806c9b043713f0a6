mod docs;
mod health;
mod links;
mod metrics;
mod redirect;

pub use docs::{openapi_document_handler, swagger_index_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler, LINKS_PATH,
};
pub use metrics::metrics_handler;
pub use redirect::redirect_handler;
