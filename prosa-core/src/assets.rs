//! # Armazém de Ativos dos Modelos
//!
//! Única fronteira de I/O da crate. As tabelas pré-treinadas vivem em dois
//! lugares:
//! - **Embutidas** no binário via `include_bytes!` (o modelo padrão);
//! - **Em disco**, quando o usuário fornece um diretório próprio no layout
//!   `<dir>/AveragedPerceptron/*.json` + `<dir>/Maxent/*.json`.
//!
//! Todas as tabelas são JSON. Depois de decodificadas elas nunca mais são
//! relidas nem mutadas.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProsaError, Result};

/// Retorna os bytes de um ativo embutido, identificado por pasta e nome.
pub fn load_asset(folder: &str, name: &str) -> Result<&'static [u8]> {
    let bytes: &'static [u8] = match (folder, name) {
        ("AveragedPerceptron", "weights.json") => {
            include_bytes!("../data/AveragedPerceptron/weights.json")
        }
        ("AveragedPerceptron", "tags.json") => {
            include_bytes!("../data/AveragedPerceptron/tags.json")
        }
        ("AveragedPerceptron", "classes.json") => {
            include_bytes!("../data/AveragedPerceptron/classes.json")
        }
        ("Maxent", "mapping.json") => include_bytes!("../data/Maxent/mapping.json"),
        ("Maxent", "weights.json") => include_bytes!("../data/Maxent/weights.json"),
        ("Maxent", "labels.json") => include_bytes!("../data/Maxent/labels.json"),
        ("Maxent", "words.json") => include_bytes!("../data/Maxent/words.json"),
        ("Punkt", "english.json") => include_bytes!("../data/Punkt/english.json"),
        _ => return Err(ProsaError::asset_not_found(format!("{folder}/{name}"))),
    };
    Ok(bytes)
}

/// Decodifica um ativo embutido para o tipo pedido.
pub fn decode_embedded<T: DeserializeOwned>(folder: &str, name: &str) -> Result<T> {
    let bytes = load_asset(folder, name)?;
    serde_json::from_slice(bytes)
        .map_err(|e| ProsaError::asset_corrupt(format!("{folder}/{name}"), e.to_string()))
}

/// Decodifica uma tabela a partir de um diretório de modelo do usuário.
pub fn decode_file<T: DeserializeOwned>(dir: &Path, folder: &str, name: &str) -> Result<T> {
    let path = dir.join(folder).join(name);
    let shown = path.display().to_string();
    let bytes = fs::read(&path).map_err(|_| ProsaError::asset_not_found(shown.clone()))?;
    serde_json::from_slice(&bytes).map_err(|e| ProsaError::asset_corrupt(shown, e.to_string()))
}

/// Serializa uma tabela para o layout em disco (usado por `Model::save`).
pub fn encode_file<T: Serialize>(dir: &Path, folder: &str, name: &str, value: &T) -> Result<()> {
    let subdir = dir.join(folder);
    let path = subdir.join(name);
    let shown = path.display().to_string();
    fs::create_dir_all(&subdir)
        .map_err(|e| ProsaError::asset_corrupt(shown.clone(), e.to_string()))?;
    let bytes = serde_json::to_vec(value)
        .map_err(|e| ProsaError::asset_corrupt(shown.clone(), e.to_string()))?;
    fs::write(&path, bytes).map_err(|e| ProsaError::asset_corrupt(shown, e.to_string()))
}
