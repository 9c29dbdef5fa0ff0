//! SFTP storage channel
//!
//! ssh2-backed implementation of the storage contract, addressed by
//! `host:port` and a username/password pair.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::path::Path;

use ssh2::{OpenFlags, OpenType, Session, Sftp};
use tracing::info;

use crate::error::{DataPrepError, Result};

use super::channel::{storage_error, StorageChannel};

/// Storage channel over one SFTP connection
pub struct SftpChannel {
    // Session must outlive the sftp handle; kept for close()
    _session: Session,
    sftp: Sftp,
    service: String,
}

impl SftpChannel {
    /// Connect to `service` ("host:port") and authenticate.
    pub fn connect(service: &str, username: &str, password: &str) -> Result<Self> {
        let connect = || -> std::result::Result<(Session, Sftp), Box<dyn std::error::Error>> {
            let tcp = TcpStream::connect(service)?;
            let mut session = Session::new()?;
            session.set_tcp_stream(tcp);
            session.handshake()?;
            session.userauth_password(username, password)?;
            let sftp = session.sftp()?;
            Ok((session, sftp))
        };

        let (session, sftp) = connect().map_err(|e| DataPrepError::Storage {
            message: format!("SFTP connect to {} failed: {}", service, e),
        })?;

        info!("initialized service - [{}] SFTP channel up", service);
        Ok(Self {
            _session: session,
            sftp,
            service: service.to_string(),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Close the connection by dropping the handles
    pub fn close(self) {}
}

impl StorageChannel for SftpChannel {
    fn open_read(&self, path: &str) -> Result<Box<dyn BufRead + Send>> {
        let file = self.sftp.open(Path::new(path)).map_err(|e| {
            if e.code() == ssh2::ErrorCode::SFTP(SFTP_NO_SUCH_FILE) {
                DataPrepError::PathNotFound {
                    path: path.to_string(),
                }
            } else {
                storage_error(path, &e)
            }
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn write_all(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut file = self
            .sftp
            .open_mode(
                Path::new(path),
                OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNCATE,
                0o644,
                OpenType::File,
            )
            .map_err(|e| storage_error(path, &e))?;
        file.write_all(data).map_err(|e| storage_error(path, &e))?;
        Ok(())
    }

    fn rename(&self, src: &str, dst: &str) -> Result<()> {
        self.sftp
            .rename(Path::new(src), Path::new(dst), None)
            .map_err(|e| storage_error(src, &e))
    }
}

/// LIBSSH2_FX_NO_SUCH_FILE
const SFTP_NO_SUCH_FILE: i32 = 2;
