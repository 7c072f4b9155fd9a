// Input preparation: résumé PDF text extraction, job description normalisation,
// and the two cleaning passes (analysis vs. PDF output).

pub mod jd_parser;
pub mod resume_parser;
pub mod text_cleaner;
