pub mod castle_tables;
