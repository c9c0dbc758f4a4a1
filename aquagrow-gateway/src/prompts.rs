//! Prompt templates for each content use case.

use crate::content::ContactInquiry;

pub(crate) fn system(company: &str) -> String {
    format!(
        "You write website content for '{company}'. Reply with JSON only, matching the requested \
         schema exactly, with no commentary or markdown."
    )
}

pub(crate) fn team_members(company: &str, count: usize) -> String {
    format!(
        "Generate a list of {count} diverse and realistic team members for '{company}', an ag-tech \
         startup in Kenya focused on drip irrigation for small-scale farmers. Include their full name, \
         a plausible role (like 'Founder & CEO', 'Head of Operations', 'Lead Agronomist', \
         'Director of Partnerships'), and a short, compelling bio (around 20-30 words) for each."
    )
}

pub(crate) fn success_stories(company: &str, count: usize) -> String {
    format!(
        "Generate {count} compelling and realistic success stories for farmers who have partnered with \
         '{company}' in Kenya. For each story, provide the farmer's full name, their county (e.g., \
         'Kitui County', 'Kajiado County'), a short, impactful quote, and a brief story (around 40-50 \
         words) detailing their transformation."
    )
}

pub(crate) fn faqs(company: &str, count: usize) -> String {
    format!(
        "Generate a list of {count} frequently asked questions (FAQs) that a small-scale farmer in Kenya \
         might have about joining a profit-sharing drip irrigation program like '{company}'. Provide a \
         clear question and a concise, reassuring answer for each. Cover topics like risk, profit \
         sharing, contract length, crop choice, and land ownership."
    )
}

pub(crate) fn inquiry_triage(company: &str, inquiry: &ContactInquiry) -> String {
    format!(
        "A user has submitted a contact form for {company}. Analyze their message and provide a \
         structured response. User Name: {}, Subject: {}, Message: \"{}\". Classify the inquiry, \
         provide a one-sentence summary, and assign a priority.",
        inquiry.name, inquiry.subject, inquiry.message
    )
}
