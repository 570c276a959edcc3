use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3BasicsSettings {
    pub bucket: String,
    pub key: String,
    /// Local file uploaded as the object's body.
    pub file: PathBuf,
    pub keep_resources: bool,
}

impl S3BasicsSettings {
    /// Upload `file` under its own file name.
    #[must_use]
    pub fn new(bucket: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let key = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "object".to_string());
        Self {
            bucket: bucket.into(),
            key,
            file,
            keep_resources: false,
        }
    }
}

/// Values collected while the scenario runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3BasicsData {
    /// The bucket was made by this run rather than reused.
    pub bucket_created: bool,
    pub etag: Option<String>,
    pub bucket_count: usize,
}
