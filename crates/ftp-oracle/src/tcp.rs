//! A [`MembershipOracle`] that talks to a real FTP-like SUL over TCP.
//!
//! Ported from `examples/original_source/Lstar_fast.py`/`vsftpd_lstar.py`'s
//! `membership_query`: open one fresh connection per query, consume the
//! greeting banner, send each symbol as a `\r\n`-terminated line, read a
//! reply line per symbol and keep its first three bytes as the output.
//! Any transport failure — refused connection, timeout, early EOF —
//! fills the remaining outputs with [`Output::OFF`] and is never
//! surfaced to the caller (spec §4.8/§7).

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use tracing::{trace, warn};

use learner_core::oracle::MembershipOracle;
use learner_core::word::{Output, Word};

/// Transport configuration for [`TcpOracle`].
#[derive(Debug, Clone)]
pub struct TcpOracleConfig {
    pub addr: SocketAddr,
    pub connect_timeout: Duration,
    pub io_timeout: Duration,
    /// Recommended by spec §5 to avoid exhausting ephemeral sockets under
    /// load; a policy of this adapter, never of the learner.
    pub inter_query_delay: Duration,
}

impl TcpOracleConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: Duration::from_millis(500),
            io_timeout: Duration::from_millis(500),
            inter_query_delay: Duration::from_millis(10),
        }
    }
}

/// A membership oracle that opens one short-lived TCP session per call.
pub struct TcpOracle {
    config: TcpOracleConfig,
}

impl TcpOracle {
    pub fn new(config: TcpOracleConfig) -> Self {
        Self { config }
    }

    fn try_ask(&self, word: &Word) -> io::Result<Vec<Output>> {
        let stream = TcpStream::connect_timeout(&self.config.addr, self.config.connect_timeout)?;
        stream.set_read_timeout(Some(self.config.io_timeout))?;
        stream.set_write_timeout(Some(self.config.io_timeout))?;
        let mut writer = stream.try_clone()?;
        let mut reader = BufReader::new(stream);

        // Consume (and discard) the greeting banner; its content is not
        // part of the protocol's observable reply sequence.
        let mut banner = String::new();
        let _ = reader.read_line(&mut banner);

        let mut outputs = Vec::with_capacity(word.len());
        let mut alive = true;
        for symbol in word {
            if !alive {
                outputs.push(Output::OFF());
                continue;
            }
            let line = format!("{}\r\n", symbol.as_str());
            if writer.write_all(line.as_bytes()).is_err() {
                alive = false;
                outputs.push(Output::OFF());
                continue;
            }
            let mut reply = String::new();
            match reader.read_line(&mut reply) {
                Ok(0) => {
                    alive = false;
                    outputs.push(Output::OFF());
                }
                Ok(_) => {
                    let trimmed = reply.trim();
                    if trimmed.is_empty() {
                        alive = false;
                        outputs.push(Output::OFF());
                    } else {
                        let code: String = trimmed.chars().take(3).collect();
                        outputs.push(Output::new(code));
                    }
                }
                Err(_) => {
                    alive = false;
                    outputs.push(Output::OFF());
                }
            }
        }
        Ok(outputs)
    }
}

impl MembershipOracle for TcpOracle {
    fn ask(&self, word: &Word) -> Vec<Output> {
        if !self.config.inter_query_delay.is_zero() {
            thread::sleep(self.config.inter_query_delay);
        }
        match self.try_ask(word) {
            Ok(outputs) => {
                trace!(?word, ?outputs, "membership query answered");
                outputs
            }
            Err(err) => {
                warn!(?word, %err, "membership query failed, session treated as dead");
                vec![Output::OFF(); word.len()]
            }
        }
    }
}
