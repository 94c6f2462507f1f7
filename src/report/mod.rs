pub mod combined_html;
pub mod email;
pub mod escape;
pub mod suite_html;
