/// Builds the object key of a survey's stored config: configured directory,
/// a single `/` separator, survey code, configured suffix. The directory may
/// be given with or without a trailing slash; an empty directory yields a
/// bare file name.
pub fn config_object_key(file_path: &str, survey_code: &str, config_suffix: &str) -> String {
    let directory = file_path.trim_end_matches('/');
    if directory.is_empty() {
        format!("{survey_code}{config_suffix}")
    } else {
        format!("{directory}/{survey_code}{config_suffix}")
    }
}
