// Static template markup. Placeholders use three shapes: [Bracketed Text],
// runs of underscores, and {BRACE} tokens.

pub const OFFER_LETTER: &str = r#"<div style="font-family: Helvetica, sans-serif; color: #333;">
  <table width="100%" style="border-bottom: 2px solid #2563eb; padding-bottom: 20px; margin-bottom: 30px;">
    <tr>
      <td valign="bottom"><h1 style="margin: 0; font-size: 28px; color: #1e293b; text-transform: uppercase;">Offer of Employment</h1></td>
      <td align="right" valign="bottom">
        <p style="margin: 0; font-weight: bold; font-size: 18px;">[Company Name]</p>
        <p style="margin: 5px 0 0; font-size: 12px; color: #64748b;">Private &amp; Confidential</p>
      </td>
    </tr>
  </table>
  <p><strong>Date:</strong> {DATE}</p>
  <p><strong>To:</strong><br>[Recipient Name]<br>[Recipient Company]</p>
  <p style="margin-top: 30px;">Dear <strong>[Recipient Name]</strong>,</p>
  <p>We are pleased to offer you the position of <strong>[Recipient Title]</strong> at <strong>[Company Name]</strong>. Your skills and experience are an excellent match for our team.</p>
  <h3 style="background-color: #f1f5f9; padding: 8px; border-left: 4px solid #2563eb;">Position Details</h3>
  <table width="100%" style="border-collapse: collapse;">
    <tr><td style="padding: 8px; font-weight: bold; width: 150px;">Start Date:</td><td style="padding: 8px;">[Start Date]</td></tr>
    <tr><td style="padding: 8px; font-weight: bold;">Reporting To:</td><td style="padding: 8px;">[Your Name], [Position]</td></tr>
    <tr><td style="padding: 8px; font-weight: bold;">Annual Salary:</td><td style="padding: 8px;">$__________ per annum</td></tr>
  </table>
  <p>[Custom Notes]</p>
  <p>Please confirm your acceptance by signing below and returning a copy to [Email].</p>
  <table width="100%" style="margin-top: 60px;">
    <tr>
      <td width="45%"><div style="border-bottom: 1px solid #000;"></div><p style="font-size: 12px;">[Recipient Name] (Signature)</p></td>
      <td width="10%"></td>
      <td width="45%"><div style="border-bottom: 1px solid #000;"></div><p style="font-size: 12px;">[Your Name], [Position]</p></td>
    </tr>
  </table>
</div>"#;

pub const WARNING_LETTER: &str = r#"<div style="font-family: Arial, sans-serif; color: #000;">
  <h2 style="text-align: center; text-transform: uppercase; border-bottom: 2px solid #000; padding-bottom: 10px;">Employee Warning Notice</h2>
  <table width="100%" style="border-collapse: collapse; margin-bottom: 20px;">
    <tr>
      <td style="padding: 8px; border: 1px solid #000; background: #eee;"><strong>Employee Name:</strong></td>
      <td style="padding: 8px; border: 1px solid #000;">[Recipient Name]</td>
    </tr>
    <tr>
      <td style="padding: 8px; border: 1px solid #000; background: #eee;"><strong>Job Title:</strong></td>
      <td style="padding: 8px; border: 1px solid #000;">[Recipient Title]</td>
    </tr>
    <tr>
      <td style="padding: 8px; border: 1px solid #000; background: #eee;"><strong>Issued By:</strong></td>
      <td style="padding: 8px; border: 1px solid #000;">[Your Name], [Position]</td>
    </tr>
    <tr>
      <td style="padding: 8px; border: 1px solid #000; background: #eee;"><strong>Date of Warning:</strong></td>
      <td style="padding: 8px; border: 1px solid #000;">{DATE}</td>
    </tr>
  </table>
  <div style="border: 1px solid #000; padding: 15px; margin-bottom: 20px;">
    <p style="margin-top: 0; font-weight: bold; text-decoration: underline;">Description of Incident:</p>
    <p>[Custom Notes]</p>
  </div>
  <div style="border: 1px solid #000; padding: 15px; margin-bottom: 20px;">
    <p style="margin-top: 0; font-weight: bold; text-decoration: underline;">Corrective Action Required:</p>
    <p>The employee is expected to improve immediately in the areas above. Failure to improve may result in further disciplinary action at [Company Name], up to and including termination.</p>
  </div>
  <table width="100%" style="margin-top: 50px;">
    <tr>
      <td width="45%"><p>__________________________</p><p style="font-size: 12px;">Manager Signature</p></td>
      <td width="10%"></td>
      <td width="45%"><p>__________________________</p><p style="font-size: 12px;">Employee Signature</p></td>
    </tr>
  </table>
</div>"#;

pub const PIP: &str = r#"<div style="font-family: sans-serif; color: #1f2937;">
  <table width="100%" style="background-color: #f3f4f6; padding: 20px; margin-bottom: 30px;">
    <tr><td><h1 style="margin: 0; color: #dc2626;">Performance Improvement Plan</h1><p style="margin: 5px 0 0; color: #6b7280;">Private &amp; Confidential</p></td></tr>
  </table>
  <table width="100%" style="border-collapse: collapse; margin-bottom: 30px;">
    <tr>
      <td width="20%" style="padding: 10px; font-weight: bold;">Employee:</td>
      <td width="30%" style="padding: 10px;">[Recipient Name]</td>
      <td width="20%" style="padding: 10px; font-weight: bold;">Review Period:</td>
      <td width="30%" style="padding: 10px;">30 / 60 / 90 Days</td>
    </tr>
    <tr>
      <td style="padding: 10px; font-weight: bold;">Manager:</td>
      <td style="padding: 10px;">[Your Name]</td>
      <td style="padding: 10px; font-weight: bold;">Date Issued:</td>
      <td style="padding: 10px;">{DATE}</td>
    </tr>
  </table>
  <p>This plan sets out the areas where your performance falls short of what [Company Name] expects, and gives you a clear opportunity to demonstrate improvement.</p>
  <h3 style="border-bottom: 2px solid #e5e7eb; padding-bottom: 5px;">1. Areas of Concern</h3>
  <p>[Custom Notes]</p>
  <h3 style="border-bottom: 2px solid #e5e7eb; padding-bottom: 5px;">2. Improvement Goals</h3>
  <table width="100%" border="1" style="border-collapse: collapse;">
    <tr><th style="padding: 12px; text-align: left;">Goal</th><th style="padding: 12px; text-align: left;">Support</th><th style="padding: 12px; text-align: left;">Expected Outcome</th></tr>
    <tr><td style="padding: 12px;">Improve attendance</td><td style="padding: 12px;">Weekly check-ins with [Your Name].</td><td style="padding: 12px;">No unexcused absences.</td></tr>
  </table>
  <h3 style="border-bottom: 2px solid #e5e7eb; padding-bottom: 5px;">3. Acknowledgment</h3>
  <p>I understand that failing to meet these expectations by the end of the review period may lead to further action.</p>
  <p style="margin-top: 60px;">Employee Signature: ____________________ &nbsp; Manager Signature: ____________________</p>
</div>"#;

pub const RESIGNATION: &str = r#"<div style="font-family: Georgia, serif; color: #111; line-height: 1.8;">
  <p style="text-align: right;">{DATE}</p>
  <p style="margin-top: 40px;"><strong>[Recipient Name]</strong><br>[Recipient Title]<br>[Recipient Company]</p>
  <p style="margin-top: 40px;">Dear [Recipient Name],</p>
  <p>Please accept this letter as formal notice that I am resigning from my position as <strong>[Position]</strong> at <strong>[Company Name]</strong>. My last day will be <strong>{LAST_DAY}</strong>.</p>
  <p>Thank you for the opportunity to work here. I have learned a great deal and have enjoyed working with my colleagues.</p>
  <p>[Custom Notes]</p>
  <p>I will do everything I can to hand over my duties smoothly over the coming weeks.</p>
  <p style="margin-top: 40px;">Sincerely,</p>
  <p><strong>[Your Name]</strong><br>[Email] | [Phone]</p>
</div>"#;
