//! # Operation Dispatch
//!
//! Routes an inbound request — a wire operation name plus string arguments —
//! onto the typed API, enforcing arity and parsing numeric/status arguments
//! before any ledger access. Wire names are the historical camelCase
//! contract surface.

use crate::domain::entities::EndorsementStatus;
use crate::domain::errors::RegistryError;
use crate::ports::inbound::{CompletionWorkflowApi, HomeLifecycleApi};
use crate::ports::outbound::LedgerStore;
use crate::service::RegistryService;

fn expect_arity(
    operation: &'static str,
    args: &[String],
    expected: usize,
) -> Result<(), RegistryError> {
    if args.len() != expected {
        return Err(RegistryError::InvalidArgument {
            operation,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_floor(value: &str) -> Result<u32, RegistryError> {
    value.parse().map_err(|_| RegistryError::MalformedInput {
        what: "floor number",
        value: value.to_string(),
    })
}

fn parse_status(value: &str) -> Result<EndorsementStatus, RegistryError> {
    EndorsementStatus::parse_token(value).ok_or_else(|| RegistryError::MalformedInput {
        what: "endorsement status",
        value: value.to_string(),
    })
}

impl<L: LedgerStore> RegistryService<L> {
    /// Resolve and run one operation. Write operations return an empty
    /// payload; queries return their result bytes.
    pub fn dispatch(&mut self, operation: &str, args: &[String]) -> Result<Vec<u8>, RegistryError> {
        match operation {
            "initLedger" => {
                expect_arity("initLedger", args, 0)?;
                self.init_ledger()?;
                Ok(Vec::new())
            }
            "queryHome" => {
                expect_arity("queryHome", args, 1)?;
                self.query_home(&args[0])
            }
            "createHome" => {
                expect_arity("createHome", args, 3)?;
                let floor = parse_floor(&args[2])?;
                self.create_home(&args[0], &args[1], floor)?;
                Ok(Vec::new())
            }
            "queryAllHomes" => {
                expect_arity("queryAllHomes", args, 0)?;
                let records = self.query_all_homes()?;
                serde_json::to_vec(&records).map_err(|e| RegistryError::RecordEncode {
                    kind: "home query payload",
                    reason: e.to_string(),
                })
            }
            "changeHomeOwnership" => {
                expect_arity("changeHomeOwnership", args, 2)?;
                self.change_home_ownership(&args[0], &args[1])?;
                Ok(Vec::new())
            }
            "notifyFloorCompletion" => {
                expect_arity("notifyFloorCompletion", args, 2)?;
                let floor = parse_floor(&args[1])?;
                self.notify_floor_completion(&args[0], floor)?;
                Ok(Vec::new())
            }
            "verifyFloorCompletion" => {
                expect_arity("verifyFloorCompletion", args, 3)?;
                let floor = parse_floor(&args[1])?;
                let status = parse_status(&args[2])?;
                self.verify_floor_completion(&args[0], floor, status)?;
                Ok(Vec::new())
            }
            "obtainCompletionVerification" => {
                expect_arity("obtainCompletionVerification", args, 2)?;
                let floor = parse_floor(&args[1])?;
                self.obtain_completion_verification(&args[0], floor)?;
                Ok(Vec::new())
            }
            unknown => Err(RegistryError::UnknownOperation(unknown.to_string())),
        }
    }
}
