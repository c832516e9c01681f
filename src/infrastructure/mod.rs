pub mod document_page;

pub use document_page::DocumentPage;
