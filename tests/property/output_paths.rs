use std::path::{Path, PathBuf};

use proptest::prelude::*;
use mjmlwatch::controller::ReloadCore;
use mjmlwatch::resolve::{to_output_path, Location};
use mjmlwatch::types::CommandMode;
use mjmlwatch_test_utils::builders::OptionsBuilder;
use mjmlwatch_test_utils::recording_logger::RecordingLogger;

// Relative directory chains below `input`, e.g. ["views", "deep"].
fn segments() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z0-9_-]{1,8}", 0..4)
}

fn file_stem() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9_.-]{0,10}"
        .prop_filter("stem must not end with a dot", |s| !s.ends_with('.'))
}

fn join(base: &str, segments: &[String], file: &str) -> PathBuf {
    let mut path = PathBuf::from(base);
    for segment in segments {
        path.push(segment);
    }
    path.push(file);
    path
}

proptest! {
    #[test]
    fn output_mirrors_the_relative_path(segs in segments(), stem in file_stem()) {
        let logger = RecordingLogger::new();
        let options = OptionsBuilder::new().resolve(CommandMode::Build, &logger);

        let source = join("src/mjml", &segs, &format!("{stem}.mjml"));
        let expected = join("mailings", &segs, &format!("{stem}.html"));

        prop_assert_eq!(to_output_path(&source, &options), expected);
    }

    #[test]
    fn sources_outside_input_stay_in_place(segs in segments(), stem in file_stem()) {
        let logger = RecordingLogger::new();
        let options = OptionsBuilder::new().resolve(CommandMode::Build, &logger);

        let source = join("other", &segs, &format!("{stem}.mjml"));
        let output = to_output_path(&source, &options);

        prop_assert_eq!(output.parent(), source.parent());
        prop_assert_eq!(output.extension().and_then(|e| e.to_str()), Some("html"));
    }

    #[test]
    fn only_source_files_under_input_qualify(
        segs in segments(),
        stem in file_stem(),
        ext in prop_oneof![Just("mjml"), Just("txt"), Just("html"), Just("mjmlx")],
        prefix in prop_oneof![Just("src/mjml"), Just("src/mjml-old"), Just("vendor/src/mjml")],
    ) {
        let core = ReloadCore::new("src/mjml", Some(Location::parse("src/mjml/views")));
        let path = join(prefix, &segs, &format!("{stem}.{ext}"));

        let expected = prefix == "src/mjml" && ext == "mjml";
        prop_assert_eq!(core.qualifies(Path::new(&path)), expected);
    }
}
