use reqwest::Client;
use tabled::Table;

use crate::{config::Config, error, info, pipeline, types::FeatureTableRow};

pub async fn sample(config: Config, access_token: String) {
    let client = Client::new();
    let sample = match pipeline::generate(&client, &config, &access_token).await {
        Ok(sample) => sample,
        Err(e) => error!("Failed to sample playlist: {}", e),
    };

    let table_rows: Vec<FeatureTableRow> = sample
        .tracks
        .iter()
        .map(|track| FeatureTableRow {
            track: track.name.clone(),
            danceability: format!("{:.3}", track.features[0]),
            energy: format!("{:.3}", track.features[1]),
            tempo: format!("{:.1}", track.features[2]),
            label: track.label,
        })
        .collect();

    println!("{}", Table::new(table_rows));
    info!(
        "{} of {} tracks sampled from {}; accuracy {:.4}",
        sample.tracks.len(),
        sample.playlist_length,
        sample.playlist_name,
        sample.model.report.accuracy
    );
}
