use std::fmt::{Display, Error, Formatter};

/// Writes the items of a slice into the formatter, separated by `sep`.
pub fn disp_iter<T: Display>(f: &mut Formatter<'_>, iterable: &[T], sep: &str) -> Result<(), Error> {
    for (i, item) in iterable.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
