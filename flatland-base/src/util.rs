//! Tools that we could imagine being in the Rust standard library, but aren't.

mod custom_format;
pub use custom_format::*;

pub mod log;

#[doc(hidden)]
pub use error_chain::ErrorChain;
mod error_chain {
    use core::error::Error;
    use core::fmt;

    /// Formatting wrapper which prints an [`Error`] together with its
    /// `source()` chain, with at least one newline between each.
    ///
    /// The text begins with the [`fmt::Display`] format of the error.
    #[doc(hidden)] // not something we wish to be stable public API
    #[derive(Clone, Copy, Debug)]
    #[expect(clippy::exhaustive_structs)]
    pub struct ErrorChain<'a>(pub &'a (dyn Error + 'a));

    impl fmt::Display for ErrorChain<'_> {
        #[allow(clippy::missing_inline_in_public_items)]
        fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut error = self.0;
            write!(fmt, "{error}")?;
            while let Some(source) = error.source() {
                error = source;
                write!(fmt, "\n\nCaused by:\n    {error}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::InvalidAabError;
    use euclid::point2;
    use pretty_assertions::assert_eq;

    #[derive(Debug, displaydoc::Display)]
    /// could not place collider
    struct PlacementError(InvalidAabError);

    impl core::error::Error for PlacementError {
        fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_chain() {
        let error = PlacementError(InvalidAabError {
            lower_bounds: point2(0., 0.),
            upper_bounds: point2(-1., 0.),
        });
        assert_eq!(
            ErrorChain(&error).to_string(),
            "could not place collider\n\nCaused by:\n    \
            invalid box sides that are misordered or NaN: lower (0.0, 0.0) upper (-1.0, 0.0)"
        );
    }
}
