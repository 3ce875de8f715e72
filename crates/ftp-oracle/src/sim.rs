//! An in-process simulation of the FTP-like SUL described in
//! `examples/original_source/ftp_server2.py`, reimplemented as a direct
//! [`MembershipOracle`] (no sockets). This is the "in-process mock SUL"
//! adapter design notes calls for: useful for fast deterministic tests
//! and for a zero-setup CLI demo target.

use learner_core::oracle::MembershipOracle;
use learner_core::word::{Output, Word};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Session {
    Connected { user_count: u32 },
    WaitPass,
    Auth,
    Closed,
}

/// A configurable in-process FTP-like SUL.
///
/// `user_threshold` is the number of `USER` commands required before
/// `PASS` is accepted — `1` reproduces the plain "login gate" from spec
/// §8 scenario 2, `2` reproduces the "two-USER gate" from scenario 3 and
/// `examples/original_source/ftp_server2.py`.
#[derive(Clone, Copy, Debug)]
pub struct FtpSim {
    user_threshold: u32,
}

impl FtpSim {
    /// `CONNECTED --USER--> WAIT_PASS --PASS--> AUTH`, no repeated `USER`
    /// required.
    pub fn single_user_gate() -> Self {
        Self { user_threshold: 1 }
    }

    /// Reproduces `ftp_server2.py`: two `USER` commands are required
    /// before `PASS` is accepted.
    pub fn two_user_gate() -> Self {
        Self { user_threshold: 2 }
    }

    fn step(&self, session: Session, command: &str) -> (Session, &'static str) {
        if command == "QUIT" {
            return (Session::Closed, "221");
        }
        match session {
            Session::Closed => (Session::Closed, "OFF"),
            Session::Connected { user_count } => match command {
                "USER" => {
                    let seen = user_count + 1;
                    if seen < self.user_threshold {
                        (Session::Connected { user_count: seen }, "331")
                    } else {
                        (Session::WaitPass, "331")
                    }
                }
                _ => (Session::Connected { user_count }, "530"),
            },
            Session::WaitPass => match command {
                "PASS" => (Session::Auth, "230"),
                _ => (Session::WaitPass, "503"),
            },
            Session::Auth => match command {
                "LIST" => (Session::Auth, "226"),
                _ => (Session::Auth, "502"),
            },
        }
    }
}

impl MembershipOracle for FtpSim {
    fn ask(&self, word: &Word) -> Vec<Output> {
        let mut session = Session::Connected { user_count: 0 };
        let mut outputs = Vec::with_capacity(word.len());
        for symbol in word {
            let (next, code) = self.step(session, symbol.as_str());
            outputs.push(Output::new(code));
            session = next;
        }
        outputs
    }
}
