use crate::layouts::Field;

/// Input and output of a transform call.
///
/// Aliasing is resolved once, when the buffers are formed: either the two
/// buffers are disjoint, or the call is explicitly in place.
pub enum NttBuffers<'a, F: Field> {
    OutOfPlace { input: &'a [F], output: &'a mut [F] },
    InPlace(&'a mut [F]),
}

impl<'a, F: Field> NttBuffers<'a, F> {
    pub fn input_len(&self) -> usize {
        match self {
            NttBuffers::OutOfPlace { input, .. } => input.len(),
            NttBuffers::InPlace(data) => data.len(),
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            NttBuffers::OutOfPlace { output, .. } => output.len(),
            NttBuffers::InPlace(data) => data.len(),
        }
    }

    pub fn is_inplace(&self) -> bool {
        matches!(self, NttBuffers::InPlace(_))
    }

    pub fn input(&self) -> &[F] {
        match self {
            NttBuffers::OutOfPlace { input, .. } => input,
            NttBuffers::InPlace(data) => data,
        }
    }

    /// Copies the input into the output buffer (if distinct) and returns the
    /// output, ready to be transformed in place.
    pub fn into_working(self) -> &'a mut [F] {
        match self {
            NttBuffers::OutOfPlace { input, output } => {
                output.copy_from_slice(input);
                output
            }
            NttBuffers::InPlace(data) => data,
        }
    }
}
