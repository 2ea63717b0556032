mod row_tests;
mod source_tests;
mod table_tests;
