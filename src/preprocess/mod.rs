//! Label encoding, feature standardization and partitioning

mod encoder;
mod scaler;
mod split;

pub use encoder::{one_hot, LabelEncoder};
pub use scaler::StandardScaler;
pub use split::{train_test_split, validation_split, Partition, SplitIndices};
