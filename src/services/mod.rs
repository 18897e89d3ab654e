pub mod asset_fetcher;
pub mod diagram_service;
pub mod docx_renderer;
pub mod text_renderer;

pub use asset_fetcher::{AssetFetcher, FetchedAsset};
pub use diagram_service::DiagramRenderer;
pub use docx_renderer::DocxRenderer;
