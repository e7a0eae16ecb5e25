//! different utility modules used throughout the project
/// tiny module to save solution into file
pub mod logger;
/// parse document with structure like "title1 key1: value1 value2 title2 1 2 3" into HashMap of sections
pub mod task_parser;
///
mod task_parser_tests;
