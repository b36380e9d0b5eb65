//! XVA result structures.

use serde::{Deserialize, Serialize};

use super::integrator::AdjustmentCurve;
use super::AdjustmentKind;

/// Scalar adjustment totals and the net figures derived from them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetAdjustments {
    /// Credit Valuation Adjustment.
    pub cva: f64,
    /// Debit Valuation Adjustment.
    pub dva: f64,
    /// Funding Valuation Adjustment.
    pub fva: f64,
    /// Liquidity Valuation Adjustment.
    pub lva: f64,
    /// `CVA − DVA`.
    pub bilateral_cva: f64,
    /// `FVA − LVA`.
    pub funding_net: f64,
    /// `CVA − DVA + FVA + LVA`.
    pub total: f64,
}

impl NetAdjustments {
    /// Derives the net figures from the four totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::xva::NetAdjustments;
    ///
    /// let net = NetAdjustments::new(10.0, 4.0, 3.0, 1.0);
    /// assert_eq!(net.bilateral_cva, 6.0);
    /// assert_eq!(net.funding_net, 2.0);
    /// assert_eq!(net.total, 10.0);
    /// ```
    pub fn new(cva: f64, dva: f64, fva: f64, lva: f64) -> Self {
        Self {
            cva,
            dva,
            fva,
            lva,
            bilateral_cva: cva - dva,
            funding_net: fva - lva,
            total: cva - dva + fva + lva,
        }
    }
}

/// The four adjustment curves of one run plus their net figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XvaResult {
    /// CVA curve.
    pub cva: AdjustmentCurve,
    /// DVA curve.
    pub dva: AdjustmentCurve,
    /// FVA curve.
    pub fva: AdjustmentCurve,
    /// LVA curve.
    pub lva: AdjustmentCurve,
    /// Scalar totals.
    pub net: NetAdjustments,
    /// Cumulative bilateral curve `CVA_cum(s) − DVA_cum(s)`.
    pub net_curve: Vec<f64>,
}

impl XvaResult {
    /// Assembles a result, deriving the net figures and net curve.
    pub fn new(
        cva: AdjustmentCurve,
        dva: AdjustmentCurve,
        fva: AdjustmentCurve,
        lva: AdjustmentCurve,
    ) -> Self {
        let net = NetAdjustments::new(cva.total(), dva.total(), fva.total(), lva.total());
        let net_curve = cva
            .cumulative
            .iter()
            .zip(&dva.cumulative)
            .map(|(c, d)| c - d)
            .collect();
        Self {
            cva,
            dva,
            fva,
            lva,
            net,
            net_curve,
        }
    }

    /// Curve for `kind`.
    #[inline]
    pub fn curve(&self, kind: AdjustmentKind) -> &AdjustmentCurve {
        match kind {
            AdjustmentKind::Cva => &self.cva,
            AdjustmentKind::Dva => &self.dva,
            AdjustmentKind::Fva => &self.fva,
            AdjustmentKind::Lva => &self.lva,
        }
    }

    /// Total for `kind`.
    #[inline]
    pub fn total(&self, kind: AdjustmentKind) -> f64 {
        self.curve(kind).total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(kind: AdjustmentKind, cumulative: Vec<f64>) -> AdjustmentCurve {
        AdjustmentCurve {
            kind,
            integrand: vec![0.0; cumulative.len()],
            cumulative,
        }
    }

    #[test]
    fn test_net_adjustments() {
        let net = NetAdjustments::new(100.0, 30.0, 20.0, 5.0);
        assert_eq!(net.bilateral_cva, 70.0);
        assert_eq!(net.funding_net, 15.0);
        assert_eq!(net.total, 95.0);
    }

    #[test]
    fn test_xva_result_net_curve() {
        let result = XvaResult::new(
            curve(AdjustmentKind::Cva, vec![0.0, 2.0, 5.0]),
            curve(AdjustmentKind::Dva, vec![0.0, 1.0, 1.5]),
            curve(AdjustmentKind::Fva, vec![0.0, 0.5, 1.0]),
            curve(AdjustmentKind::Lva, vec![0.0, 0.1, 0.1]),
        );

        assert_eq!(result.net_curve, vec![0.0, 1.0, 3.5]);
        assert_eq!(result.net.bilateral_cva, 3.5);
        assert_eq!(result.total(AdjustmentKind::Lva), 0.1);
        assert_eq!(result.curve(AdjustmentKind::Fva).kind, AdjustmentKind::Fva);
    }
}
