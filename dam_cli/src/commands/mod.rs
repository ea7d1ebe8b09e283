mod apply;
mod fields;
mod folders;
mod form;
mod query;
mod row_prompt;

pub use apply::{Matches, apply_query, matching_assets};
pub use fields::list_fields;
pub use folders::list_folders;
pub use form::{form_payload, show_form, validate_form};
pub use query::{compose_query, compose_rows, resolve_field};
