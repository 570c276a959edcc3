//! Stage a file in S3: create a bucket, upload the file as an object, then
//! list the account's buckets. The bucket and object are removed afterwards
//! once the user agrees.

mod context;
mod data;
mod operation;
mod steps;

pub use context::S3BasicsContext;
pub use data::{S3BasicsData, S3BasicsSettings};
pub use operation::{S3BasicsOperation, S3BasicsOutcome};
pub use steps::{CreateBucketStep, ListBucketsStep, UploadObjectStep};
