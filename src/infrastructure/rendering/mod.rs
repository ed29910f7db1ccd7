//! Message renderer implementations

mod http_renderer;
mod template;

pub use http_renderer::HttpMessageRenderer;
pub use template::TemplateRenderer;
