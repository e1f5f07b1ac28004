pub mod help;
pub mod project_list;
