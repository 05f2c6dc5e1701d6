/// Builds the CodePipeline console URL for a pipeline.
///
/// # Arguments
///
/// * `region` - Console region (e.g., "us-east-1")
/// * `pipeline_name` - Pipeline name
///
/// # Returns
///
/// Clickable URL to the pipeline view (e.g.,
/// <https://us-east-1.console.aws.amazon.com/codepipeline/home?region=us-east-1#/view/web>)
pub fn console_url(region: &str, pipeline_name: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/codepipeline/home?region={region}#/view/{pipeline_name}"
    )
}
