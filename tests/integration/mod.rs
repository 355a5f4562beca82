//! Integration tests for the cfctl control-plane client

mod command_pipeline;
mod config_loading;
mod curl_repository;
mod repositories;
mod test_utils;
