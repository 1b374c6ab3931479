//! Tests for argument parsing, sweep planning and command execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use illusionlab::io::cli::{Cli, Command, CommandRunner, sweep_distortions, sweep_file_name};
    use std::fs;
    use std::path::PathBuf;

    // Tests render arguments and defaults are parsed
    // Verified by changing the default distortion
    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "illusionlab",
            "render",
            "--assets",
            "assets",
            "--variation",
            "4",
            "--output",
            "frame.png",
        ])
        .expect("Arguments should parse");

        assert!(cli.should_show_progress());
        match cli.command {
            Command::Render {
                assets,
                variation,
                distortion,
                output,
                force,
            } => {
                assert_eq!(assets, PathBuf::from("assets"));
                assert_eq!(variation, 4);
                assert!((distortion - 0.5).abs() < 1e-12);
                assert_eq!(output, PathBuf::from("frame.png"));
                assert!(!force);
            }
            _ => unreachable!("Expected Render command"),
        }
    }

    // Tests the global quiet flag is accepted after a subcommand
    // Verified by declaring the flag on the top level only
    #[test]
    fn test_parse_quiet_sweep() {
        let cli = Cli::try_parse_from([
            "illusionlab",
            "sweep",
            "-a",
            "assets",
            "-o",
            "frames",
            "--steps",
            "3",
            "--no-skip",
            "--quiet",
        ])
        .expect("Arguments should parse");

        assert!(!cli.should_show_progress());
        assert!(matches!(
            cli.command,
            Command::Sweep {
                steps: 3,
                no_skip: true,
                ..
            }
        ));
    }

    // Tests commands missing required arguments are rejected
    // Verified by making the output optional
    #[test]
    fn test_parse_missing_output() {
        assert!(Cli::try_parse_from(["illusionlab", "render", "--assets", "assets"]).is_err());
        assert!(Cli::try_parse_from(["illusionlab"]).is_err());
    }

    // Tests sweep distortions cover the slider evenly
    // Verified by excluding the upper end
    #[test]
    fn test_sweep_distortions() {
        let values = sweep_distortions(5).expect("Positive step count");
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0];

        assert_eq!(values.len(), expected.len());
        for (value, want) in values.iter().zip(expected) {
            assert!((value - want).abs() < 1e-12);
        }
        assert_eq!(sweep_distortions(1).ok(), Some(vec![0.5]));
        assert!(sweep_distortions(0).is_err());
    }

    // Tests sweep frame names sort by variation and distortion
    // Verified by omitting zero padding
    #[test]
    fn test_sweep_file_name() {
        assert_eq!(sweep_file_name(3, 0.25), "variation_03_d0.250.png");
        assert!(sweep_file_name(2, 1.0) < sweep_file_name(10, 0.0));
    }

    // Tests the render command writes a frame
    // Verified by skipping the save step
    #[test]
    fn test_run_render() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let output = dir.path().join("frame.png");
        let cli = Cli::try_parse_from([
            "illusionlab".into(),
            "render".into(),
            "--assets".into(),
            dir.path().join("assets").into_os_string(),
            "--output".into(),
            output.clone().into_os_string(),
            "--quiet".into(),
        ])
        .expect("Arguments should parse");

        CommandRunner::new(cli).run().expect("Render should succeed");

        let frame = image::open(&output).expect("Frame should be readable");
        assert_eq!((frame.width(), frame.height()), (500, 500));
        assert!(dir.path().join("assets/background").is_dir());
    }

    // Tests the session command saves a complete record
    // Verified by saving before replaying responses
    #[test]
    fn test_run_session() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let responses = dir.path().join("responses.json");
        let script: Vec<String> = (0..12)
            .map(|selector| format!(r#"{{"selector": {selector}, "distortion": 0.5}}"#))
            .collect();
        fs::write(&responses, format!("[{}]", script.join(","))).expect("Script should be written");

        let results = dir.path().join("results");
        let cli = Cli::try_parse_from([
            "illusionlab".into(),
            "session".into(),
            "--results".into(),
            results.clone().into_os_string(),
            "--responses".into(),
            responses.into_os_string(),
            "-q".into(),
        ])
        .expect("Arguments should parse");

        CommandRunner::new(cli).run().expect("Session should be saved");

        let records = fs::read_dir(&results)
            .map(Iterator::count)
            .expect("Results folder should exist");
        assert_eq!(records, 1);
    }

    // Tests the session command fails on an incomplete script
    // Verified by saving incomplete sessions
    #[test]
    fn test_run_session_incomplete() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let responses = dir.path().join("responses.json");
        fs::write(&responses, r#"[{"selector": 0, "distortion": 0.5}]"#)
            .expect("Script should be written");

        let cli = Cli::try_parse_from([
            "illusionlab".into(),
            "session".into(),
            "--results".into(),
            dir.path().join("results").into_os_string(),
            "--responses".into(),
            responses.into_os_string(),
            "-q".into(),
        ])
        .expect("Arguments should parse");

        assert!(CommandRunner::new(cli).run().is_err());
    }
}
