/// Entity round-trips against a live PostgreSQL instance
pub mod ship_tests;
