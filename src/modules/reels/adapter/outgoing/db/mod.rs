mod reel_repository_postgres;

pub use reel_repository_postgres::ReelRepositoryPostgres;
