pub(crate) use super::{EdgeListProvider, EdgeListProviderError};
