//! Markdown rendering of the final recommendation.
//!
//! Fixed template: product section, location line, status marker with
//! confidence, reason, then numbered instructions (recyclable) or bulleted
//! tips (not recyclable).

use crate::agents::location::LocationInfo;
use crate::agents::product::ProductInfo;
use crate::agents::synthesis::Recommendation;
use crate::ric;

/// Render the recommendation into the user-facing markdown answer.
pub fn recommendation(
    product: &ProductInfo,
    location: &LocationInfo,
    rec: &Recommendation,
) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push("# ♻️ Recycling Recommendation\n".to_string());

    out.push("## 📦 Product Information".to_string());
    out.push(format!("**Product:** {}", product.product_name));
    let material = if product.ric_code.is_empty() {
        product.material.clone()
    } else {
        ric::normalize(&product.ric_code)
    };
    out.push(format!("**Material:** {material}\n"));

    let place = if location.state.is_empty() {
        location.municipality.clone()
    } else {
        format!("{}, {}", location.municipality, location.state)
    };
    out.push(format!("## 📍 Location: {place} ({})\n", location.zip_code));

    out.push("## 🎯 Recommendation".to_string());
    if rec.is_recyclable {
        let pct = (rec.confidence * 100.0).round() as i64;
        out.push(format!("**Status:** ✅ Recyclable (Confidence: {pct}%)\n"));
        out.push(format!("**Reason:** {}\n", rec.reason));

        if !rec.instructions.is_empty() {
            out.push("## 📋 How to Recycle".to_string());
            for (i, step) in rec.instructions.iter().enumerate() {
                out.push(format!("{}. {step}", i + 1));
            }
            out.push(String::new());
        }
    } else {
        out.push("**Status:** ❌ Not Recyclable\n".to_string());
        out.push(format!("**Reason:** {}\n", rec.reason));

        if !rec.tips.is_empty() {
            out.push("## 💡 Tips".to_string());
            for tip in &rec.tips {
                out.push(format!("• {tip}"));
            }
            out.push(String::new());
        }
    }

    out.push("---".to_string());
    out.push("*This recommendation is based on your local recycling guidelines.*".to_string());

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::location::CurbsideProgram;

    fn product() -> ProductInfo {
        ProductInfo {
            product_name: "Coca-Cola bottle".into(),
            material: "PET plastic".into(),
            ric_code: "1".into(),
            confidence: 0.95,
        }
    }

    fn location() -> LocationInfo {
        LocationInfo {
            zip_code: "94102".into(),
            municipality: "San Francisco".into(),
            state: "CA".into(),
            curbside_recycling: CurbsideProgram::default(),
            confidence: 0.9,
        }
    }

    #[test]
    fn recyclable_renders_status_zip_and_steps() {
        let rec = Recommendation {
            is_recyclable: true,
            confidence: 0.95,
            reason: "PET #1 is accepted curbside.".into(),
            instructions: vec!["Rinse it".into(), "Bin it".into()],
            tips: vec![],
        };
        let md = recommendation(&product(), &location(), &rec);
        assert!(md.contains("✅ Recyclable (Confidence: 95%)"));
        assert!(md.contains("94102"));
        assert!(md.contains("San Francisco, CA"));
        // RIC normalized for display.
        assert!(md.contains("PET #1"));
        assert!(md.contains("1. Rinse it"));
        assert!(md.contains("2. Bin it"));
    }

    #[test]
    fn not_recyclable_renders_tips() {
        let rec = Recommendation {
            is_recyclable: false,
            confidence: 0.9,
            reason: "PS #6 is rejected locally.".into(),
            instructions: vec![],
            tips: vec!["Check for a drop-off program".into()],
        };
        let md = recommendation(&product(), &location(), &rec);
        assert!(md.contains("❌ Not Recyclable"));
        assert!(md.contains("• Check for a drop-off program"));
        assert!(!md.contains("How to Recycle"));
    }

    #[test]
    fn non_plastic_falls_back_to_material() {
        let mut p = product();
        p.ric_code = String::new();
        p.material = "glass".into();
        let rec = Recommendation {
            is_recyclable: false,
            confidence: 1.0,
            reason: "RIC-coded plastics only.".into(),
            instructions: vec![],
            tips: vec![],
        };
        let md = recommendation(&p, &location(), &rec);
        assert!(md.contains("**Material:** glass"));
    }
}
