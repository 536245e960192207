use cohort_entity::{
    Ciphertext, EntityError, KeyId, Modulus, Proposal, ProposalId, Record, SubjectIds,
};
use log::{debug, info};

use super::Contract;
use crate::errors::Result;
use crate::ledger::{Keyspace, Ledger};
use crate::oracle::CryptoOracle;

const KIND: &str = "proposal";

impl<L: Ledger, O: CryptoOracle> Contract<L, O> {
    /// Aggregate the subjects' ciphertexts into an encrypted mean and store it
    /// as proposal `id`.
    ///
    /// Subjects are resolved in order and the first failure aborts the whole
    /// call. Nothing is written unless the mean was computed.
    pub fn create_proposal(
        &self,
        id: ProposalId,
        requester_id: String,
        requested_id: String,
        subject_ids: SubjectIds,
        key_id: KeyId,
        modulus: &Modulus,
    ) -> Result<()> {
        if id.is_empty() {
            return Err(EntityError::EmptyIdentifier("proposal id").into());
        }
        if subject_ids.is_empty() {
            return Err(EntityError::EmptySubjectList(id.into_inner()).into());
        }

        let mut subjects: Vec<Record> = Vec::with_capacity(subject_ids.len());
        for subject_id in &subject_ids {
            subjects.push(self.find_record(subject_id)?);
        }
        debug!("Proposal {}: resolved {} subjects", id, subjects.len());

        let ciphertexts: Vec<&str> = subjects
            .iter()
            .map(|record| record.condition().as_str())
            .collect();
        let mean = self
            .oracle
            .compute_modular_mean(modulus.as_str(), &ciphertexts)?;

        let proposal = Proposal::new(
            id,
            requester_id,
            requested_id,
            subject_ids,
            key_id,
            Ciphertext::new(mean),
        )?;
        self.store(
            Keyspace::Proposals,
            KIND,
            proposal.id().as_str(),
            proposal.encode(),
        )?;

        info!(
            "Proposal {} stored for requester {} ({} subjects)",
            proposal.id(),
            proposal.requester_id(),
            proposal.subject_ids().len()
        );
        Ok(())
    }

    pub fn find_proposal(&self, id: &ProposalId) -> Result<Proposal> {
        self.load(Keyspace::Proposals, KIND, id.as_str(), |bytes| {
            Proposal::decode(id.clone(), bytes)
        })
    }
}
