use headphone_motion_api::{HeadphoneMotionService, HeadphoneMotionServiceCreator};

mod stub;
pub use self::stub::StubServiceCreator;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use self::mock::{MockRemote, MockServiceCreator};

#[cfg(all(target_os = "ios", feature = "coremotion"))]
mod coremotion;
#[cfg(all(target_os = "ios", feature = "coremotion"))]
pub use self::coremotion::CoreMotionServiceCreator;

// Picks the first service that works on this platform, falling back to the
// stub that only warns.
pub fn default_service() -> Box<dyn HeadphoneMotionService> {
    let creators: Vec<Box<dyn HeadphoneMotionServiceCreator>> = vec![
        #[cfg(all(target_os = "ios", feature = "coremotion"))]
        CoreMotionServiceCreator::new(),
    ];

    for creator in &creators {
        let service = creator.new_service();
        if service.is_supported() {
            return service;
        }
    }

    StubServiceCreator::new().new_service()
}
