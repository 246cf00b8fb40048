//! Fake ffmpeg/ffprobe executables for exercising the real process plumbing

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Freeze-probe stderr of a 90 second video with freezes at 10-15 and 45.2-50.7.
///
/// Status lines are `\r`-terminated the way ffmpeg redraws them.
const FREEZE_PROBE_STDERR: &str = "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':
  Duration: 00:01:30.00, start: 0.000000, bitrate: 1205 kb/s
frame=  450 fps=0.0 q=-0.0 size=N/A time=00:00:15.00 bitrate=N/A speed=  30x\r\
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_start: 10
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_duration: 5
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_end: 15
frame= 1350 fps=0.0 q=-0.0 size=N/A time=00:00:45.00 bitrate=N/A speed=  30x\r\
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_start: 45.2
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_duration: 5.5
[freezedetect @ 0x55d0c1a2b3c0] lavfi.freezedetect.freeze_end: 50.7
frame= 2700 fps=0.0 q=-0.0 size=N/A time=00:01:30.00 bitrate=N/A speed=  30x
";

const NO_FREEZE_STDERR: &str = "  Duration: 00:01:30.00, start: 0.000000, bitrate: 1205 kb/s
frame= 2700 fps=0.0 q=-0.0 size=N/A time=00:01:30.00 bitrate=N/A speed=  30x
";

/// Concat-pass stderr; the demuxer reports the summed segment length
const CONCAT_STDERR: &str = "  Duration: 00:01:19.50, start: 0.000000, bitrate: 1200 kb/s
frame= 1000 fps=0.0 q=-1.0 size=    2048kB time=00:00:40.00 bitrate=N/A speed=  80x
frame= 2385 fps=0.0 q=-1.0 size=    4096kB time=00:01:19.50 bitrate=N/A speed=  80x
";

/// A temp directory holding an input video and fake `ffmpeg`/`ffprobe` scripts.
///
/// The fake ffmpeg honours two variables: `FAKE_NO_FREEZE` makes the probe
/// report nothing and `FAKE_FAIL_CONCAT` makes the concat pass exit 1, as
/// does an output path containing `broken`. The
/// concat pass copies its directive to `<output>.list` and records the
/// directive's own path in `<output>.listpath`.
pub struct FakeTools {
    pub dir: TempDir,
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub input: PathBuf,
}

impl FakeTools {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.mp4");
        fs::write(&input, b"not really a video").unwrap();

        let freeze_log = write_fixture(dir.path(), "freeze.log", FREEZE_PROBE_STDERR);
        let quiet_log = write_fixture(dir.path(), "quiet.log", NO_FREEZE_STDERR);
        let concat_log = write_fixture(dir.path(), "concat.log", CONCAT_STDERR);

        let ffmpeg = dir.path().join("ffmpeg");
        write_script(
            &ffmpeg,
            &format!(
                r#"#!/bin/sh
case "$*" in
  *-version*)
    echo "ffmpeg version 6.1-fake Copyright (c) 2000-2023"
    ;;
  *freezedetect*)
    if [ -n "$FAKE_NO_FREEZE" ]; then
      cat '{quiet}' >&2
    else
      cat '{freeze}' >&2
    fi
    ;;
  *concat*)
    prev=""
    for arg in "$@"; do
      if [ "$prev" = "-i" ]; then list="$arg"; fi
      prev="$arg"
      out="$arg"
    done
    cp "$list" "$out.list"
    echo "$list" > "$out.listpath"
    case "$out" in *broken*) FAKE_FAIL_CONCAT=1 ;; esac
    if [ -n "$FAKE_FAIL_CONCAT" ]; then
      echo "Conversion failed!" >&2
      exit 1
    fi
    cat '{concat}' >&2
    printf 'trimmed video' > "$out"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#,
                quiet = quiet_log.display(),
                freeze = freeze_log.display(),
                concat = concat_log.display(),
            ),
        );

        let ffprobe = dir.path().join("ffprobe");
        write_script(
            &ffprobe,
            r#"#!/bin/sh
case "$*" in
  *-version*) echo "ffprobe version 6.1-fake" ;;
  *) echo "90.000000" ;;
esac
"#,
        );

        Self {
            dir,
            ffmpeg,
            ffprobe,
            input,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Directive the fake concat pass received for `output`
    pub fn directive_for(&self, output: &Path) -> String {
        fs::read_to_string(sibling(output, ".list")).unwrap()
    }

    /// Where the directive file lived while the concat pass ran
    pub fn directive_path_for(&self, output: &Path) -> PathBuf {
        let recorded = fs::read_to_string(sibling(output, ".listpath")).unwrap();
        PathBuf::from(recorded.trim_end())
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
