use cohort_entity::{Ciphertext, KeyId, Modulus, ProposalId, ReKeyToken, RekeyedResult, ResultId};
use log::info;

use super::Contract;
use crate::errors::Result;
use crate::ledger::{Keyspace, Ledger};
use crate::oracle::CryptoOracle;

const KIND: &str = "result";

impl<L: Ledger, O: CryptoOracle> Contract<L, O> {
    /// Re-key a proposal's mean for `key_id` and store it under the id derived
    /// from `proposal_id`. Returns that id.
    ///
    /// Whatever was stored at the derived id before is overwritten.
    pub fn create_result(
        &self,
        proposal_id: &ProposalId,
        first_token: &ReKeyToken,
        second_token: &ReKeyToken,
        key_id: KeyId,
        modulus: &Modulus,
    ) -> Result<ResultId> {
        let proposal = self.find_proposal(proposal_id)?;

        let rekeyed = self.oracle.key_switch(
            modulus.as_str(),
            first_token.as_str(),
            second_token.as_str(),
            proposal.value().as_str(),
        )?;

        let result = RekeyedResult::new(proposal_id.clone(), key_id, Ciphertext::new(rekeyed));
        self.store(Keyspace::Results, KIND, result.id().as_str(), result.encode())?;

        info!(
            "Result {} stored for proposal {} under key {}",
            result.id(),
            proposal_id,
            result.key_id()
        );
        Ok(result.id().clone())
    }

    pub fn find_result(&self, id: &ResultId) -> Result<RekeyedResult> {
        self.load(Keyspace::Results, KIND, id.as_str(), |bytes| {
            RekeyedResult::decode(id.clone(), bytes)
        })
    }
}
