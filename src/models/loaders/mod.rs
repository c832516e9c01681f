pub mod attachment_loader;

pub use attachment_loader::{detect_mime_type, load_attachment, load_attachments};
