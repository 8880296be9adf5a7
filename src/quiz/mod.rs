pub mod catalog;
pub mod category;
pub mod feedback;
pub mod model;
pub mod report;
pub mod scoring;

pub use catalog::{Catalog, CatalogError};
pub use category::Category;
pub use feedback::FeedbackTier;
pub use model::{CategoryScore, QuizAssessment, QuizItem, QuizResponse, QuizResult};
pub use report::{render_text_report, report_file_name};
pub use scoring::{score, ScoreError};
