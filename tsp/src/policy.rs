// Copyright 2026 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Per-tenant TSA trust policy.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use x509_parser::pem::Pem;

use crate::{error::TspError, oids::TIMESTAMPING_EKU_OID};

/// A named set of trust anchor certificates for one TSA.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrustAnchor {
    /// Operator-facing name of this anchor set.
    pub name: String,

    /// PEM bundle of anchor certificates.
    pub certificates_pem: String,

    /// EKU the TSA's signing certificate must carry, as a dotted OID.
    /// Defaults to id-kp-timeStamping.
    #[serde(default = "default_required_eku")]
    pub required_eku: String,
}

fn default_required_eku() -> String {
    TIMESTAMPING_EKU_OID.to_string()
}

impl TrustAnchor {
    /// Build an anchor set from a PEM bundle, requiring the
    /// timestamping EKU.
    pub fn from_pem(name: &str, certificates_pem: &str) -> Self {
        Self {
            name: name.to_string(),
            certificates_pem: certificates_pem.to_string(),
            required_eku: default_required_eku(),
        }
    }

    /// Decode the PEM bundle into anchor certificate DERs.
    ///
    /// An anchor set whose bundle yields no certificates is a
    /// configuration error.
    pub fn anchor_ders(&self) -> Result<Vec<Vec<u8>>, TspError> {
        let mut ders = Vec::new();

        for maybe_pem in Pem::iter_from_buffer(self.certificates_pem.as_bytes()) {
            match maybe_pem {
                Ok(pem) => ders.push(pem.contents),
                Err(e) => {
                    return Err(TspError::TrustConfiguration(format!(
                        "trust anchor {name}: {e}",
                        name = self.name
                    )));
                }
            }
        }

        if ders.is_empty() {
            return Err(TspError::TrustConfiguration(format!(
                "trust anchor {name} contains no certificates",
                name = self.name
            )));
        }

        Ok(ders)
    }
}

/// Latency and error-budget thresholds a host applies when routing
/// between TSAs. Carried here so policy documents round-trip; nothing
/// in this crate enforces them.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SlaThresholds {
    /// 95th-percentile response latency, in milliseconds.
    pub p95_latency_ms: u64,

    /// Fraction of failed exchanges tolerated per month.
    pub monthly_error_budget: f64,
}

/// A tenant's TSA trust policy: which anchors to chain to, which TSA
/// policies to accept, and routing hints for the host.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TenantTsaPolicy {
    /// Tenant this policy belongs to.
    pub tenant_id: String,

    /// Trust anchor sets; the signing certificate must chain to one of
    /// them. An empty list makes every token untrusted, and a policy
    /// whose anchors cannot be parsed is a configuration error.
    #[serde(default)]
    pub trust_anchors: Vec<TrustAnchor>,

    /// TSA policy OIDs this tenant accepts. Empty means no restriction.
    #[serde(default)]
    pub accepted_policies: BTreeSet<String>,

    /// TSA URLs in preference order, for the host's router.
    #[serde(default)]
    pub routing_preference: Vec<String>,

    /// SLA thresholds for the host's router.
    #[serde(default)]
    pub sla: Option<SlaThresholds>,

    /// Whether the host should run revocation checks (OCSP/CRL) on the
    /// chain after validation. This crate records the flag but performs
    /// no revocation checking itself.
    #[serde(default)]
    pub require_revocation_check: bool,
}

impl TenantTsaPolicy {
    /// A policy with no anchors and no restrictions, for building up in
    /// tests and configuration code.
    pub fn new(tenant_id: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            ..Default::default()
        }
    }

    /// Add a trust anchor set.
    pub fn add_trust_anchor(&mut self, anchor: TrustAnchor) {
        self.trust_anchors.push(anchor);
    }

    /// Accept tokens issued under `policy_oid`.
    pub fn accept_policy(&mut self, policy_oid: &str) {
        self.accepted_policies.insert(policy_oid.to_string());
    }

    /// True when `policy_oid` is acceptable under this policy.
    ///
    /// An empty accepted set means the tenant has not restricted
    /// policies and every OID passes.
    pub fn accepts_policy(&self, policy_oid: &str) -> bool {
        self.accepted_policies.is_empty() || self.accepted_policies.contains(policy_oid)
    }

    /// All anchor DERs across the anchor sets.
    ///
    /// Fails with [`TspError::TrustConfiguration`] when there are no
    /// anchor sets or any set is unusable.
    pub(crate) fn all_anchor_ders(&self) -> Result<Vec<Vec<u8>>, TspError> {
        if self.trust_anchors.is_empty() {
            return Err(TspError::TrustConfiguration(format!(
                "tenant {id} has no trust anchors configured",
                id = self.tenant_id
            )));
        }

        let mut ders = Vec::new();
        for anchor in &self.trust_anchors {
            ders.extend(anchor.anchor_ders()?);
        }

        Ok(ders)
    }
}
