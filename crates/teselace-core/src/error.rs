/// Errors raised when constructing a topology with unusable dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopologyError {
    /// A rectangle needs a positive width and height.
    #[display("rectangle dimensions must be positive, got {width}x{height}")]
    EmptyRectangle {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A pyramid needs a positive size.
    #[display("pyramid size must be positive")]
    EmptyPyramid,
}
