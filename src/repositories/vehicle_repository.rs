//! Store de la flota
//!
//! Lee y escribe la colección completa de vehículos como un único snapshot.
//! La escritura va a un fichero temporal en el mismo directorio y luego se
//! renombra sobre el original, así nunca se observa un fichero a medias.
//!
//! La inicialización de un fichero ausente nunca reemplaza uno existente:
//! el `[]` inicial se enlaza en su sitio con `hard_link`, que falla si otro
//! escritor ya creó el fichero. Así una lectura concurrente no puede pisar un
//! snapshot recién guardado.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::fleet::FleetSnapshot;
use crate::utils::errors::{AppError, AppResult};

/// Contrato de persistencia de la flota
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Leer el snapshot completo. Si no hay estado persistido se inicializa vacío.
    async fn load(&self) -> AppResult<FleetSnapshot>;

    /// Sobrescribir atómicamente el estado persistido con el snapshot completo
    async fn save(&self, snapshot: &FleetSnapshot) -> AppResult<()>;
}

/// Store respaldado por un fichero JSON (un array de vehículos)
#[derive(Debug, Clone)]
pub struct JsonFileVehicleStore {
    path: PathBuf,
}

impl JsonFileVehicleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vehicles.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }

    async fn ensure_parent_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// `None` si el fichero no existe
    async fn read_snapshot(&self) -> AppResult<Option<FleetSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Storage(e)),
        };

        let snapshot: FleetSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::CorruptState(format!("{}: {}", self.path.display(), e))
        })?;

        debug!("Loaded {} vehicles from {}", snapshot.len(), self.path.display());
        Ok(Some(snapshot))
    }

    /// Crear el fichero con una flota vacía solo si sigue sin existir
    async fn initialize_empty(&self) -> AppResult<()> {
        self.ensure_parent_dir().await?;
        let bytes = serialize(&FleetSnapshot::default())?;

        let tmp_path = self.temp_path();
        if let Err(e) = write_file(&tmp_path, &bytes).await {
            remove_temp(&tmp_path).await;
            return Err(AppError::Storage(e));
        }

        let linked = tokio::fs::hard_link(&tmp_path, &self.path).await;
        remove_temp(&tmp_path).await;

        match linked {
            Ok(()) => {
                info!("📄 Fleet store {} not found, initialized empty", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Fleet store {} created concurrently", self.path.display());
                Ok(())
            }
            Err(e) => Err(AppError::Storage(e)),
        }
    }
}

#[async_trait]
impl VehicleStore for JsonFileVehicleStore {
    async fn load(&self) -> AppResult<FleetSnapshot> {
        if let Some(snapshot) = self.read_snapshot().await? {
            return Ok(snapshot);
        }

        self.initialize_empty().await?;
        self.read_snapshot().await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Fleet store {} disappeared after initialization",
                self.path.display()
            ))
        })
    }

    async fn save(&self, snapshot: &FleetSnapshot) -> AppResult<()> {
        self.ensure_parent_dir().await?;
        let bytes = serialize(snapshot)?;

        let tmp_path = self.temp_path();
        let written = write_file(&tmp_path, &bytes).await;
        let result = match written {
            Ok(()) => tokio::fs::rename(&tmp_path, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            remove_temp(&tmp_path).await;
            return Err(AppError::Storage(e));
        }

        debug!("Saved {} vehicles to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

fn serialize(snapshot: &FleetSnapshot) -> AppResult<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot)
        .map_err(|e| AppError::Internal(format!("Error serializing fleet: {}", e)))
}

async fn remove_temp(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!("Could not remove temp file {}: {}", path.display(), e);
        }
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}
