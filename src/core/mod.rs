pub mod clock;
pub mod pairing;
pub mod report;
pub mod watermark;
