pub mod avatar;
pub mod config_service;
pub mod paths;
pub mod pdf_exporter;
pub mod pdf_text;
pub mod secret_service;

pub use crate::avatar::{AvatarSource, HttpAvatarSource};
pub use crate::config_service::ConfigService;
pub use crate::paths::AppPaths;
pub use crate::pdf_exporter::PdfExporter;
pub use crate::secret_service::SecretServiceImpl;
