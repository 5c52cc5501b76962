use std::borrow::Cow;
use std::path::Path;

use crate::executor::CommandSpec;

/// Builds the `nextflow` argument vector for a spec:
/// `run <workflow> --<name> <value>... [-with-trace <file>]`.
pub(crate) fn command_line(spec: &CommandSpec) -> Vec<String> {
    let mut args = Vec::with_capacity(2 + spec.params.len() * 2 + 2);
    args.push("run".to_string());
    args.push(spec.workflow.clone());

    for (name, value) in &spec.params {
        args.push(format!("--{name}"));
        args.push(value.clone());
    }

    if let Some(trace) = &spec.trace_file {
        args.push("-with-trace".to_string());
        args.push(trace.display().to_string());
    }

    args
}

/// Renders a program and its arguments as a single shell-quoted line, for logs.
pub(crate) fn render(program: &Path, args: &[String]) -> String {
    let program = program.display().to_string();
    std::iter::once(shell_quote(&program))
        .chain(args.iter().map(|arg| shell_quote(arg)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_./:=@%+-".contains(c)
}

/// POSIX single-quote escaping; arguments made only of safe characters pass through.
pub(crate) fn shell_quote(arg: &str) -> Cow<'_, str> {
    if !arg.is_empty() && arg.chars().all(is_shell_safe) {
        return Cow::Borrowed(arg);
    }
    Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_layout() {
        let spec = CommandSpec::new("LanguageMachines/PICCL/ticcl.nf", "/work")
            .param("inputdir", "ocr_output")
            .param("clip", "20")
            .with_trace("trace.txt");

        assert_eq!(
            command_line(&spec),
            vec![
                "run",
                "LanguageMachines/PICCL/ticcl.nf",
                "--inputdir",
                "ocr_output",
                "--clip",
                "20",
                "-with-trace",
                "trace.txt",
            ]
        );
    }

    #[test]
    fn test_command_line_without_trace() {
        let spec = CommandSpec::new("ocr.nf", "/work");
        assert_eq!(command_line(&spec), vec!["run", "ocr.nf"]);
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("ocr_output"), "ocr_output");
        assert_eq!(shell_quote("/data/in-put/x.tif"), "/data/in-put/x.tif");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("my scans"), "'my scans'");
        assert_eq!(shell_quote("20; rm -rf /"), "'20; rm -rf /'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_render() {
        let args = vec!["run".to_string(), "ocr.nf".to_string(), "--inputdir".to_string(), "a b".to_string()];
        assert_eq!(render(Path::new("nextflow"), &args), "nextflow run ocr.nf --inputdir 'a b'");
    }
}
