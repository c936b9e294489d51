pub mod city_guide;
pub mod destination;
pub mod guide;
pub mod lease;
