pub mod aggregate;
pub mod badges;
pub mod recommend;
pub mod trend;
