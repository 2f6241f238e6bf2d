mod assign;
mod change_status;
mod create;
mod get;
mod list;
mod stats;
mod update_details;
