pub mod city_guide_repo;
pub mod destination_repo;
pub mod guide_repo;
pub mod work_repo;

pub use city_guide_repo::CityGuideRepo;
pub use destination_repo::DestinationRepo;
pub use guide_repo::GuideRepo;
pub use work_repo::WorkRepo;
