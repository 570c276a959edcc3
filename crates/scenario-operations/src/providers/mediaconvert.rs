use async_trait::async_trait;
use aws_sdk_mediaconvert::Client;
use aws_sdk_mediaconvert::types::{
    ContainerSettings, ContainerType, FileGroupSettings, H264RateControlMode, H264Settings,
    Input, Job, JobSettings, Output, OutputGroup, OutputGroupSettings, OutputGroupType,
    VideoCodec, VideoCodecSettings, VideoDescription,
};
use scenario_core::{Result, ServiceError};
use tracing::debug;

use super::context::AwsContext;
use super::convert::{service_error, timestamp};
use crate::traits::MediaConvertProvider;
use crate::types::{JobInfo, TranscodeJobSpec};

const MAX_BITRATE: i32 = 5_000_000;

pub struct AwsMediaConvertProvider {
    client: Client,
}

impl AwsMediaConvertProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.mediaconvert_client())
    }
}

/// Single MP4 output with H.264 video.
fn job_settings(spec: &TranscodeJobSpec) -> JobSettings {
    let video = VideoDescription::builder()
        .codec_settings(
            VideoCodecSettings::builder()
                .codec(VideoCodec::H264)
                .h264_settings(
                    H264Settings::builder()
                        .rate_control_mode(H264RateControlMode::Qvbr)
                        .max_bitrate(MAX_BITRATE)
                        .build(),
                )
                .build(),
        )
        .build();

    let output = Output::builder()
        .container_settings(
            ContainerSettings::builder()
                .container(ContainerType::Mp4)
                .build(),
        )
        .video_description(video)
        .build();

    let group = OutputGroup::builder()
        .output_group_settings(
            OutputGroupSettings::builder()
                .r#type(OutputGroupType::FileGroupSettings)
                .file_group_settings(
                    FileGroupSettings::builder()
                        .destination(&spec.file_output)
                        .build(),
                )
                .build(),
        )
        .outputs(output)
        .build();

    JobSettings::builder()
        .inputs(Input::builder().file_input(&spec.file_input).build())
        .output_groups(group)
        .build()
}

fn job_info(operation: &str, job: Option<&Job>) -> Result<JobInfo> {
    let job = job.ok_or_else(|| ServiceError::unexpected(operation, "response has no job"))?;
    let id = job
        .id()
        .ok_or_else(|| ServiceError::unexpected(operation, "job has no id"))?;
    Ok(JobInfo {
        id: id.to_string(),
        status: job
            .status()
            .map_or_else(|| "UNKNOWN".to_string(), |s| s.as_str().to_string()),
        created_at: job.created_at().and_then(timestamp),
    })
}

#[async_trait]
impl MediaConvertProvider for AwsMediaConvertProvider {
    async fn create_job(&self, spec: &TranscodeJobSpec) -> Result<String> {
        let output = self
            .client
            .create_job()
            .role(&spec.role_arn)
            .settings(job_settings(spec))
            .send()
            .await
            .map_err(|e| service_error("CreateJob", e))?;

        let info = job_info("CreateJob", output.job())?;
        debug!(job = %info.id, status = %info.status, "transcoding job created");
        Ok(info.id)
    }

    async fn get_job(&self, job_id: &str) -> Result<JobInfo> {
        let output = self
            .client
            .get_job()
            .id(job_id)
            .send()
            .await
            .map_err(|e| service_error("GetJob", e))?;
        job_info("GetJob", output.job())
    }
}
