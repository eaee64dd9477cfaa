#![allow(unused_macros)]

//! Logging shims: route to `defmt` on hardware, `log` on the host, or
//! nothing when neither backend is enabled. `log` wins when both features
//! are active (the host test configuration).

macro_rules! trace {
    ($($x:tt)*) => {
        {
            #[cfg(feature = "log")]
            ::log::trace!($($x)*);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            ::defmt::trace!($($x)*);
            #[cfg(all(not(feature = "log"), not(feature = "defmt")))]
            let _ = ();
        }
    };
}

macro_rules! debug {
    ($($x:tt)*) => {
        {
            #[cfg(feature = "log")]
            ::log::debug!($($x)*);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            ::defmt::debug!($($x)*);
            #[cfg(all(not(feature = "log"), not(feature = "defmt")))]
            let _ = ();
        }
    };
}

macro_rules! info {
    ($($x:tt)*) => {
        {
            #[cfg(feature = "log")]
            ::log::info!($($x)*);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            ::defmt::info!($($x)*);
            #[cfg(all(not(feature = "log"), not(feature = "defmt")))]
            let _ = ();
        }
    };
}

macro_rules! warn {
    ($($x:tt)*) => {
        {
            #[cfg(feature = "log")]
            ::log::warn!($($x)*);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            ::defmt::warn!($($x)*);
            #[cfg(all(not(feature = "log"), not(feature = "defmt")))]
            let _ = ();
        }
    };
}

macro_rules! error {
    ($($x:tt)*) => {
        {
            #[cfg(feature = "log")]
            ::log::error!($($x)*);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            ::defmt::error!($($x)*);
            #[cfg(all(not(feature = "log"), not(feature = "defmt")))]
            let _ = ();
        }
    };
}
