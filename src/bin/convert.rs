//! Conversion worker binary
//!
//! Runs one pipeline instance over the file list given on the command
//! line. Horizontal scaling happens outside: the orchestrator starts
//! `num_worker` of these with disjoint file lists.

use std::env;

use tracing::{error, info};

use dataprep_core::config::{JobConfig, JobKind};
use dataprep_core::convert::{ChainBuilder, RestCatalog};
use dataprep_core::data::{ConversionPipeline, JsonLineReader};
use dataprep_core::storage::SftpChannel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("starting conversion worker");

    let hist_no = env::var("JOB_HIST_NO")?;
    let task_idx = env::var("JOB_TASK_IDX").unwrap_or_else(|_| "0".into());
    let job_dir = env::var("JOB_DIR").unwrap_or_else(|_| "/eyeCloudAI/data/processing".into());
    let kind = match env::var("JOB_KIND").as_deref() {
        Ok("detection") => JobKind::Detection,
        _ => JobKind::Training,
    };

    let sftp_addr = env::var("SFTP_ADDR").unwrap_or_else(|_| "localhost:22".into());
    let sftp_user = env::var("SFTP_USER")?;
    let sftp_pass = env::var("SFTP_PASS")?;
    let catalog_url = env::var("CATALOG_URL").unwrap_or_else(|_| "http://localhost:9100".into());

    let file_list: Vec<String> = env::args().skip(1).collect();
    if file_list.is_empty() {
        error!("no input files given");
        return Err("usage: convert <file>...".into());
    }

    let job = JobConfig::load(&hist_no, &task_idx, kind, &job_dir)?;
    info!(
        "job {} loaded: {} fields, {} workers declared",
        job.job_filename(),
        job.fields().len(),
        job.num_worker()
    );

    let channel = SftpChannel::connect(&sftp_addr, &sftp_user, &sftp_pass)?;

    let catalog = RestCatalog::new(catalog_url);
    let chains = ChainBuilder::new(&catalog).build(job.fields())?;

    let pipeline = ConversionPipeline::new(&job, &channel);
    let mut reader = JsonLineReader::new(&channel, chains);

    let source_path = file_list[0].clone();
    let shapes = pipeline.run(&mut reader, &file_list, &source_path)?;

    info!(
        "conversion complete: input {:?}, output {}",
        shapes.input_units, shapes.output_units
    );

    channel.close();
    Ok(())
}
