//! `ceelog convert` command handler
//!
//! Reads lines from a file or stdin, decodes them into events and writes one
//! encoded line per event to stdout. The `all` encoder prints each event as
//! syslog, JSON and XML after a blank line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use tracing::info;

use ceelog_codec::{JsonEncoder, ReaderSource, SyslogEncoder, XmlEncoder, decoder_for, encoder_for};
use ceelog_core::config::{CeeConfig, CodecConfig};
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::{Encoder, Event};

use crate::cli::{Compactness, ConvertArgs};
use crate::error::CliError;

/// Fold the command-line options into the loaded configuration.
///
/// Flags win over the file and the environment. `-v` wins over `--log-level`.
/// The merged configuration is validated again.
pub fn apply_overrides(
    config: &mut CeeConfig,
    args: &ConvertArgs,
    log_level: Option<&str>,
) -> Result<(), CliError> {
    if let Some(level) = log_level {
        config.general.log_level = level.to_owned();
    }
    if let Some(decoder) = &args.decoder {
        config.codec.decoder.clone_from(decoder);
    }
    if let Some(encoder) = &args.encoder {
        config.codec.encoder.clone_from(encoder);
    }
    if args.decoder_format.is_some() {
        config.codec.decoder_format.clone_from(&args.decoder_format);
    }
    if args.encoder_format.is_some() {
        config.codec.encoder_format.clone_from(&args.encoder_format);
    }
    if args.compact == Some(Compactness::Ultra) {
        config.context.ultra_compact = true;
    }
    if args.verbose {
        config.general.log_level = "trace".to_owned();
    }
    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Encoder selection for the converter.
pub enum Emitter {
    /// One encoder, one line per event.
    Single(Box<dyn Encoder>),
    /// syslog, JSON and XML for every event.
    All {
        syslog: SyslogEncoder,
        json: JsonEncoder,
        xml: XmlEncoder,
    },
}

impl Emitter {
    pub fn from_config(codec: &CodecConfig) -> Result<Self, CliError> {
        if codec.encoder == "all" {
            return Ok(Self::All {
                syslog: SyslogEncoder::new(),
                json: JsonEncoder::new(),
                xml: XmlEncoder::new(),
            });
        }
        let encoder = encoder_for(&codec.encoder, codec.encoder_format.as_deref())?;
        Ok(Self::Single(encoder))
    }

    /// Write one event.
    pub fn emit(&self, event: &Event, out: &mut dyn Write) -> Result<(), CeeError> {
        match self {
            Self::Single(encoder) => writeln!(out, "{}", encoder.encode(event)?)?,
            Self::All { syslog, json, xml } => {
                writeln!(out)?;
                writeln!(out, "syslog: {}", syslog.encode(event)?)?;
                writeln!(out, "json..: {}", json.encode(event)?)?;
                writeln!(out, "xml...: {}", xml.encode(event)?)?;
            }
        }
        Ok(())
    }
}

/// Decode everything from `input` and write the encoded events to `out`.
///
/// Returns the number of events written.
pub fn run(config: &CeeConfig, input: impl BufRead, out: &mut dyn Write) -> Result<usize, CliError> {
    let ctx = Context::from_config(&config.context);
    let mut decoder = decoder_for(&config.codec.decoder, config.codec.decoder_format.as_deref())?;
    let emitter = Emitter::from_config(&config.codec)?;

    // JSON lines are taken verbatim; other formats may carry backslash escapes.
    let unescape = config.codec.decoder != "json";
    let mut source = ReaderSource::new(input).with_unescape(unescape);
    let mut sink = |event: Event| -> Result<(), CeeError> { emitter.emit(&event, &mut *out) };

    let events = decoder
        .decode(&ctx, &mut source, &mut sink)
        .map_err(CliError::Decode)?;
    out.flush()?;

    info!(
        decoder = %config.codec.decoder,
        encoder = %config.codec.encoder,
        lines = source.lines_read(),
        events,
        "conversion finished"
    );
    Ok(events)
}

/// Execute the `convert` command against stdin/stdout or the `--input` file.
pub fn execute(args: &ConvertArgs, config: &CeeConfig) -> Result<usize, CliError> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| CliError::Input {
                path: path.display().to_string(),
                source: e,
            })?;
            run(config, BufReader::new(file), &mut out)
        }
        None => run(config, std::io::stdin().lock(), &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(config: &CeeConfig, input: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(config, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).expect("valid UTF-8"))
    }

    fn config_with(args: ConvertArgs) -> CeeConfig {
        let mut config = CeeConfig::default();
        apply_overrides(&mut config, &args, None).expect("overrides should validate");
        config
    }

    #[test]
    fn test_internal_to_syslog_by_default() {
        let config = CeeConfig::default();
        let output = convert(&config, "e:\nf:field1\nv:value1\nv:value2\nf:field2\nv:value3\n")
            .expect("conversion should succeed");
        assert_eq!(output, "[cee@115 field1=\"value1,value2\" field2=\"value3\"]\n");
    }

    #[test]
    fn test_all_encoder_prints_three_formats() {
        let config = config_with(ConvertArgs {
            encoder: Some("all".to_owned()),
            ..Default::default()
        });
        let output = convert(&config, "e:\nf:a\nv:1\n").expect("conversion should succeed");
        assert_eq!(
            output,
            "\nsyslog: [cee@115 a=\"1\"]\njson..: {\"a\": \"1\"}\nxml...: <event><Field name =\"a\"><value>1</value></Field></event>\n"
        );
    }

    #[test]
    fn test_apache_to_csv() {
        let config = config_with(ConvertArgs {
            decoder: Some("apache".to_owned()),
            encoder: Some("csv".to_owned()),
            decoder_format: Some("host,ident,user".to_owned()),
            encoder_format: Some("user,host".to_owned()),
            ..Default::default()
        });
        let output = convert(&config, "127.0.0.1 - frank\n10.0.0.2 bob -\n")
            .expect("conversion should succeed");
        assert_eq!(output, "\"frank\",\"127.0.0.1\"\n\"\",\"10.0.0.2\"\n");
    }

    #[test]
    fn test_json_input_is_not_unescaped() {
        let config = config_with(ConvertArgs {
            decoder: Some("json".to_owned()),
            encoder: Some("json".to_owned()),
            compact: Some(Compactness::Ultra),
            ..Default::default()
        });
        let output = convert(&config, "{\"path\": \"C:\\\\tmp\"}\n").expect("conversion should succeed");
        assert_eq!(output, "{\"path\":\"C:\\\\tmp\"}\n");
    }

    #[test]
    fn test_internal_input_is_unescaped() {
        let config = config_with(ConvertArgs {
            encoder: Some("json".to_owned()),
            ..Default::default()
        });
        let output = convert(&config, "e:\nf:msg\nv:a\\tb\n").expect("conversion should succeed");
        assert_eq!(output, "{\"msg\": \"a\\tb\"}\n");
    }

    #[test]
    fn test_decode_error_stops_conversion() {
        let config = CeeConfig::default();
        let err = convert(&config, "e:\nf:a\nbad line\n").expect_err("bad line should fail");
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("line 3"), "unexpected: {err}");
    }

    #[test]
    fn test_csv_without_names_is_config_error() {
        let mut config = CeeConfig::default();
        let args = ConvertArgs {
            encoder: Some("csv".to_owned()),
            ..Default::default()
        };
        let err = apply_overrides(&mut config, &args, None).expect_err("csv needs a name list");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_log_level_flag_is_config_error() {
        let mut config = CeeConfig::default();
        let err = apply_overrides(&mut config, &ConvertArgs::default(), Some("loud"))
            .expect_err("unknown level should be rejected");
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("log_level"), "unexpected: {err}");
    }

    #[test]
    fn test_log_level_flag_is_applied() {
        let mut config = CeeConfig::default();
        apply_overrides(&mut config, &ConvertArgs::default(), Some("debug"))
            .expect("debug is a valid level");
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn test_verbose_wins_over_log_level_flag() {
        let mut config = CeeConfig::default();
        let args = ConvertArgs {
            verbose: true,
            ..Default::default()
        };
        apply_overrides(&mut config, &args, Some("warn")).expect("overrides should validate");
        assert_eq!(config.general.log_level, "trace");
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = config_with(ConvertArgs {
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.general.log_level, "trace");
    }
}
