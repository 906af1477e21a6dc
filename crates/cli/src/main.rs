use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use devicefs::{
    DirectoryContext, DirectoryType, DownloadProgress, FileEncoding, FileSystemConfig, FileSystemService,
    LocalFileSystem, ProgressCallback, file_utils, get_module_names, load_json_modules, mime,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "devicefs.toml";

#[derive(Debug, Parser)]
#[command(name = "devicefs", version, about = "Application file operations from the command line")]
struct Cli {
    /// Path to a TOML config file. Defaults to ./devicefs.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show document and cache roots.
    Dirs,
    /// Show information about a file or directory.
    Info { uri: String },
    /// Print file contents.
    Read {
        uri: String,
        #[arg(long)]
        encoding: Option<FileEncoding>,
    },
    /// Write a string to a file.
    Write {
        uri: String,
        content: String,
        #[arg(long)]
        encoding: Option<FileEncoding>,
    },
    /// Copy a file or directory.
    Cp { source: String, destination: String },
    /// Move a file or directory.
    Mv { source: String, destination: String },
    /// Delete a file or directory.
    Rm { uri: String },
    /// Create a directory and its parents.
    Mkdir { uri: String },
    /// List a directory (the document root by default).
    Ls { uri: Option<String> },
    /// Download a URL.
    Download {
        url: String,
        destination: Option<String>,
        /// Log download progress.
        #[arg(long)]
        progress: bool,
    },
    /// Remove everything inside the cache directory.
    ClearCache,
    /// Total size of a directory (the cache root by default).
    Du { uri: Option<String> },
    /// Generate a unique file path.
    Path {
        filename: String,
        #[arg(long, default_value = "documentDirectory")]
        directory: DirectoryType,
    },
    /// Describe a filename: MIME type, media kind and sanitized form.
    Mime { filename: String },
    /// Aggregate JSON modules from a directory.
    Modules {
        dir: PathBuf,
        #[arg(long)]
        recursive: bool,
        #[arg(long, default_value = "*.json")]
        pattern: String,
        /// Print only module names.
        #[arg(long)]
        names: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let host = LocalFileSystem::from_config(&config).context("failed to initialize host filesystem")?;
    host.ensure_roots()
        .await
        .context("failed to prepare document and cache directories")?;
    let fs = FileSystemService::new(Arc::new(host)).with_default_encoding(config.default_encoding);

    run(&fs, cli.command).await
}

async fn run(fs: &FileSystemService, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Dirs => print(&json!({
            "documentDirectory": fs.get_document_directory(),
            "cacheDirectory": fs.get_cache_directory(),
        })),
        Command::Info { uri } => match fs.get_file_info(&uri).await {
            Some(info) => {
                let formatted = file_utils::format_file_size(info.size);
                print(&json!({ "info": info, "formattedSize": formatted }))
            }
            None => failure(&format!("not found: {uri}")),
        },
        Command::Read { uri, encoding } => match fs.read_file(&uri, encoding).await {
            Some(content) => {
                println!("{content}");
                Ok(ExitCode::SUCCESS)
            }
            None => failure(&format!("failed to read {uri}")),
        },
        Command::Write {
            uri,
            content,
            encoding,
        } => outcome(&fs.write_file(&uri, &content, encoding).await),
        Command::Cp {
            source,
            destination,
        } => outcome(&fs.copy_file(&source, &destination).await),
        Command::Mv {
            source,
            destination,
        } => outcome(&fs.move_file(&source, &destination).await),
        Command::Rm { uri } => flag(fs.delete_file(&uri).await),
        Command::Mkdir { uri } => flag(fs.create_directory(&uri).await),
        Command::Ls { uri } => {
            let uri = uri.unwrap_or_else(|| fs.get_document_directory());
            print(&fs.list_directory(&uri).await)
        }
        Command::Download {
            url,
            destination,
            progress,
        } => {
            let result = if progress {
                let callback: ProgressCallback = Arc::new(|update: DownloadProgress| {
                    info!(
                        written = update.total_bytes_written,
                        expected = update.total_bytes_expected_to_write,
                        progress = update.progress,
                        "download progress"
                    );
                });
                fs.download_file_with_progress(&url, destination.as_deref(), callback)
                    .await
            } else {
                fs.download_file(&url, destination.as_deref()).await
            };
            outcome(&result)
        }
        Command::ClearCache => flag(fs.clear_cache().await),
        Command::Du { uri } => {
            let uri = uri.unwrap_or_else(|| fs.get_cache_directory());
            let size = fs.get_directory_size(&uri).await;
            print(&json!({
                "uri": uri,
                "size": size,
                "formattedSize": file_utils::format_file_size(size),
            }))
        }
        Command::Path {
            filename,
            directory,
        } => print(&fs.generate_file_path(&filename, directory)),
        Command::Mime { filename } => print(&json!({
            "mimeType": mime::get_mime_type(&filename),
            "isImage": mime::is_image_file(&filename),
            "isVideo": mime::is_video_file(&filename),
            "isAudio": mime::is_audio_file(&filename),
            "sanitized": file_utils::sanitize_filename(&filename),
        })),
        Command::Modules {
            dir,
            recursive,
            pattern,
            names,
        } => {
            let context = DirectoryContext::new(&dir, recursive, &pattern)
                .with_context(|| format!("failed to scan module directory: {}", dir.display()))?;
            if names {
                print(&get_module_names(&context))
            } else {
                print(&load_json_modules(&context))
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FileSystemConfig> {
    match path {
        Some(path) => FileSystemConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            info!("loading filesystem config from {DEFAULT_CONFIG_FILE}");
            FileSystemConfig::from_file(DEFAULT_CONFIG_FILE)
        }
        None => {
            debug!("no config file found, using defaults");
            Ok(FileSystemConfig::default())
        }
    }
}

fn print<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

fn outcome(result: &devicefs::FileOperationResult) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn flag(success: bool) -> anyhow::Result<ExitCode> {
    print(&json!({ "success": success }))?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn failure(message: &str) -> anyhow::Result<ExitCode> {
    eprintln!("{message}");
    Ok(ExitCode::FAILURE)
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
